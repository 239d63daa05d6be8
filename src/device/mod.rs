pub(crate) mod detector;
pub(crate) mod theme;

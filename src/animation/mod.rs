pub(crate) mod ease;
pub(crate) mod pool;
pub(crate) mod tween;

pub(crate) mod frames;
pub(crate) mod observer;
pub(crate) mod tasks;
pub(crate) mod timers;
pub(crate) mod timing;

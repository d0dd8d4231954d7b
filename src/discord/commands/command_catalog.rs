// Discord commands module.

pub mod setchannel;

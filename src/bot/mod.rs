pub mod commander;
pub mod commands;
pub mod dispatcher;
pub mod messages;
pub mod transport;

#[cfg(test)]
mod testing;

// Library crate: scene state engine, command channel client and the JSON
// agent command interface. Rendering lives outside this crate.

pub mod channel;
pub mod command;
pub mod fixtures;
pub mod harness;
pub mod session;
pub mod state;

/*!
Command handling.

Layout:
  src/cmd/
    mod.rs       (this file)
    command.rs   (Command enum + parsing helpers)
    dispatch.rs  (Invocation, Dispatcher: one behavior per command)
    batch.rs     (batch file -> invocations)
    format.rs    (colour + output blocks shared by print and log)

Conventions:
  - Formatters return strings and never print.
  - The dispatcher is the only place that prints or appends to the log file.
*/

pub mod batch;
pub mod command;
pub mod dispatch;
pub mod format;

pub use command::Command;
pub use dispatch::{Dispatcher, Invocation};
pub use format::StyleOptions;

// Operator-facing configuration: where to connect, what set to build, and how
// loudly to log while doing it. Everything can come from flags or from the
// environment, which is how it is normally supplied inside a container.


mod logging;
mod settings;

pub use logging::{init_logging, DEFAULT_FILTER};
pub use settings::{default_members, Command, MemberArg, Settings, DEFAULT_SET, DEFAULT_URI};

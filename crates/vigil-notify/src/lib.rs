pub mod email;
pub mod notifier;

pub use email::EmailNotifier;
pub use notifier::Notifier;

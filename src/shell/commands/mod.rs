//! Individual command implementations.

mod add;
mod delete;
mod edit;
mod export;
mod forgot;
mod generate;
mod help;
mod import;
mod list;
mod login;
mod logout;
mod quit;
mod register;
mod show;
mod strength;
mod suggest;
mod whoami;

pub use add::AddCommand;
pub use delete::DeleteCommand;
pub use edit::EditCommand;
pub use export::{DEFAULT_EXPORT_FILE, ExportCommand};
pub use forgot::ForgotCommand;
pub use generate::GenerateCommand;
pub use help::HelpCommand;
pub use import::ImportCommand;
pub use list::ListCommand;
pub use login::LoginCommand;
pub use logout::LogoutCommand;
pub use quit::QuitCommand;
pub use register::RegisterCommand;
pub use show::ShowCommand;
pub use strength::StrengthCommand;
pub use suggest::SuggestCommand;
pub use whoami::WhoamiCommand;

use std::sync::Arc;

use super::command::CommandRegistry;

/// Registers all built-in commands with the registry.
pub fn register_all(registry: &mut CommandRegistry) {
    registry.register(Arc::new(GenerateCommand));
    registry.register(Arc::new(StrengthCommand));
    registry.register(Arc::new(SuggestCommand));
    registry.register(Arc::new(LoginCommand));
    registry.register(Arc::new(RegisterCommand));
    registry.register(Arc::new(ForgotCommand));
    registry.register(Arc::new(LogoutCommand));
    registry.register(Arc::new(WhoamiCommand));
    registry.register(Arc::new(ListCommand));
    registry.register(Arc::new(ShowCommand));
    registry.register(Arc::new(AddCommand));
    registry.register(Arc::new(EditCommand));
    registry.register(Arc::new(DeleteCommand));
    registry.register(Arc::new(ImportCommand));
    registry.register(Arc::new(ExportCommand));
    registry.register(Arc::new(HelpCommand));
    registry.register(Arc::new(QuitCommand));
}

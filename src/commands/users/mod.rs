pub mod create_user_command;

pub use create_user_command::CreateUserCommand;

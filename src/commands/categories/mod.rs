pub mod add_category_command;

pub use add_category_command::AddCategoryCommand;

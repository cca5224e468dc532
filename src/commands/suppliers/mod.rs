pub mod add_supplier_command;

pub use add_supplier_command::AddSupplierCommand;

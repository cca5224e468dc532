pub mod add_work_assignment_command;

pub use add_work_assignment_command::AddWorkAssignmentCommand;

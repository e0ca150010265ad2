pub mod command_launcher;
pub mod service_home;

pub use command_launcher::CommandLauncher;
pub use service_home::ServiceHome;

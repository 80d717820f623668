pub mod dashboard;
pub mod dialogs;
pub mod login;
pub mod panels;

pub use dashboard::Dashboard;
pub use dialogs::{AlertDialog, AlertKind};
pub use login::{LoginField, LoginScreen};
pub use panels::{BranchesView, HeaderBar, StatusBar, UsersView};

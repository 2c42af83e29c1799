mod list_files;
mod login;
mod logout;
mod upload_file;

pub use list_files::{ListFilesError, ListFilesUseCase, MISSING_LIST_FIELDS};
pub use login::{LoginError, LoginOutcome, LoginUseCase, MISSING_CREDENTIALS};
pub use logout::{LogoutError, LogoutUseCase};
pub use upload_file::{UploadFileError, UploadFileUseCase, MISSING_UPLOAD_FIELDS};

//! Infrastructure Layer

pub mod mailer;
pub mod media;
pub mod postgres;

pub use mailer::{LogMailer, MailError, Mailer};
pub use media::{ImageUpload, MediaStore};
pub use postgres::PgAuthRepository;

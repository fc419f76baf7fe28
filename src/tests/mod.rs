mod login;
mod media;
mod notes;
mod session;

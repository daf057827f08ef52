pub mod reject;

//! Vetrina is a small self-hosted admin panel for managing blog entries and
//! their cover images: list, create, edit, toggle, delete, each entry backed
//! by one image stored on the filesystem.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;

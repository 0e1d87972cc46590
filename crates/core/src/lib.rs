//! Domain logic for the studio content service.
//!
//! This crate has no database or HTTP dependencies so the rules can be
//! unit-tested in isolation and reused by every layer above it.

pub mod dashboard;
pub mod error;
pub mod inquiry;
pub mod pricing;
pub mod publication;
pub mod roles;
pub mod slug;
pub mod storage;
pub mod types;
pub mod upload;
pub mod video;
pub mod whatsapp;

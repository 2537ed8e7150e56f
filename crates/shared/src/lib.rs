//! Shared utilities for the notes service backend.
//!
//! This crate provides the cryptographic building blocks used by the API layer:
//! - Password hashing with Argon2id
//! - Bearer token signing and verification (HS256 JWT)

pub mod jwt;
pub mod password;

//! Checkout targets and working-directory migration
//!
//! This module handles:
//! - Parsing the four checkout forms into a [`target::CheckoutTarget`]
//! - Planning the file system changes that make the working directory match
//!   a snapshot, before any of them is applied

pub mod migration;
pub mod target;

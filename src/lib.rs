//! # artemis
//!
//! Core of the Artemis travel companion: the wire types, the backend gateway
//! and one state machine per screen (chat, explore, city, safety, profile,
//! bucket list). Nothing here touches the DOM, so the web app in `frontend/`
//! and the native terminal client share it.

pub mod api;
pub mod bucket_list;
pub mod chat;
pub mod city;
pub mod config;
pub mod errors;
pub mod explore;
pub mod models;
pub mod profile;
pub mod safety;

#[cfg(test)]
mod testing;

pub mod chat;
pub mod city;
pub mod explore;
pub mod map;
pub mod nav;
pub mod profile;
pub mod safety;

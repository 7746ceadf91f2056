// MyLabGuide-api lib.rs
//
// HTTP surface of MyLabGuide: request/response entities, handlers,
// routing and the OpenAPI document.

pub mod api;
pub mod entities;
pub mod openapi;

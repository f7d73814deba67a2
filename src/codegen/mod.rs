//! # Layer Emitters
//!
//! Everything that turns contracts and statements into artifact
//! descriptions:
//! - [`mapper`] and [`sqlmap`] add derived methods and statements to
//!   existing descriptions without touching what is already there,
//! - [`service`] and [`controller`] build the two new classes,
//! - [`scaffold`] produces host-style baselines when nothing exists yet.

pub mod controller;
pub mod mapper;
pub mod scaffold;
pub mod service;
pub mod sqlmap;

pub use controller::{Binding, ControllerClass, Handler, HttpMethod, emit_controller};
pub use mapper::augment_interface;
pub use scaffold::{baseline_interface, baseline_sql_map};
pub use service::{ServiceAction, ServiceClass, ServiceMethod, emit_service};
pub use sqlmap::augment_sql_map;

pub mod integrator;
pub mod rigid_body;

pub use integrator::{Integrator, SemiImplicitEuler};
pub use rigid_body::{BodySnapshot, RigidBodyState};

//! Implements the finite element machinery: bases, quadrature, elements, and assembly

mod assembly;
mod basis;
mod constitutive;
mod fe_data;
mod finite_element;
mod functions;
mod quadrature;
mod solid;
mod thermal;
pub use crate::fe::assembly::*;
pub use crate::fe::basis::*;
pub use crate::fe::constitutive::*;
pub use crate::fe::fe_data::*;
pub use crate::fe::finite_element::*;
pub use crate::fe::functions::*;
pub use crate::fe::quadrature::*;
pub use crate::fe::solid::*;
pub use crate::fe::thermal::*;

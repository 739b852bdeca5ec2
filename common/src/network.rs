//! IPv4 address-space models.
//!
//! * [`subnet`]: CIDR blocks and the ordered walk over their addresses.
//! * [`target`]: parsing of user supplied targets into subnets and jobs.

pub mod subnet;
pub mod target;

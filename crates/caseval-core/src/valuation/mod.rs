pub mod comps;
pub mod dcf;

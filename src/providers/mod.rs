pub mod skydns;

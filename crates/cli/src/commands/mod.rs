pub(crate) mod inquiries;
pub(crate) mod serve;

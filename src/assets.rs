pub(crate) mod decode;
pub(crate) mod intake;
pub(crate) mod template;

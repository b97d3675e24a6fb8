pub(crate) mod gazette;

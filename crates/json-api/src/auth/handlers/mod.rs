pub(crate) mod send_code;

mod validate;

pub use self::validate::JsonBody;

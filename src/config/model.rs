use std::fmt;

/// Key of a server entry in the Rancher CLI config.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServerId(String);

/// Opaque project identifier as reported by the Rancher API, e.g. `c-m8x2k:p-7lqvd`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectId(String);

macro_rules! string_id {
    ($name:ident) => {
        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }
    };
}

string_id!(ServerId);
string_id!(ProjectId);

/// API credential stored in the `tokenKey` field.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Token(String);

#[derive(Debug, PartialEq, Eq)]
pub enum Credentials<'a> {
    Basic { user: &'a str, password: &'a str },
    Bearer(&'a str),
    Anonymous,
}

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Rancher API keys come as `access:secret` and go out as basic auth.
    pub fn credentials(&self) -> Credentials<'_> {
        if self.0.is_empty() {
            return Credentials::Anonymous;
        }

        match self.0.split_once(':') {
            Some((user, password)) => Credentials::Basic { user, password },
            None => Credentials::Bearer(&self.0),
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

/// The server an invocation operates on, resolved once from the config and
/// handed to every component call.
#[derive(Debug, Clone)]
pub struct ServerContext {
    pub id: ServerId,
    pub url: String,
    pub token: Token,
}

//! Registry of transaction kinds and the fields each one carries.
//!
//! The registry is the single description of every kind: its ledger code, its
//! command name and aliases, and its payload fields with their value types.
//! Payload building, validation of raw transactions and help output all read
//! from it.

use crate::errors::CoreError;
use serde_json::Value;
use std::fmt;

/// The value type of a payload field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Any string, taken as-is.
    Text,
    /// A signed 64-bit integer.
    Integer,
    /// An arbitrary JSON value.
    Json,
    /// A JSON array of integers.
    IntegerList,
}

impl FieldType {
    /// Converts a command-line argument into a field value.
    pub fn parse_arg(&self, field: &str, arg: &str) -> Result<Value, CoreError> {
        match self {
            FieldType::Text => Ok(Value::String(arg.to_string())),
            FieldType::Integer => arg
                .trim()
                .parse::<i64>()
                .map(Value::from)
                .map_err(|e| CoreError::MalformedArgument(format!("{}: {:?} is not an integer: {}", field, arg, e))),
            FieldType::Json | FieldType::IntegerList => {
                let value: Value = serde_json::from_str(arg)
                    .map_err(|e| CoreError::MalformedArgument(format!("{}: invalid JSON: {}", field, e)))?;
                self.check(field, value)
            }
        }
    }

    /// Checks that a JSON value has this type.
    pub fn check(&self, field: &str, value: Value) -> Result<Value, CoreError> {
        let ok = match (self, &value) {
            (FieldType::Text, Value::String(_)) => true,
            (FieldType::Integer, Value::Number(n)) => n.is_i64(),
            (FieldType::Json, _) => true,
            (FieldType::IntegerList, Value::Array(items)) => items.iter().all(|v| v.is_i64()),
            _ => false,
        };
        if ok {
            Ok(value)
        } else {
            Err(CoreError::MalformedArgument(format!(
                "{}: expected {}, got {}",
                field, self, value
            )))
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldType::Text => "text",
            FieldType::Integer => "integer",
            FieldType::Json => "json",
            FieldType::IntegerList => "integer list",
        };
        f.write_str(name)
    }
}

/// One payload field of a transaction kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Name of the field in the payload
    pub name: &'static str,
    /// Value type
    pub ty: FieldType,
    /// Human readable description
    pub about: &'static str,
}

const fn field(name: &'static str, ty: FieldType, about: &'static str) -> FieldSpec {
    FieldSpec { name, ty, about }
}

/// The closed set of transaction kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TransactionKind {
    CreateAccount,
    ApproveNode,
    DisapproveNode,
    Transfer,
    Comment,
    Profile,
    Follow,
    Unfollow,
    NewKey,
    RemoveKey,
    ChangePassword,
}

/// Registry entry describing a transaction kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindSpec {
    /// The kind
    pub kind: TransactionKind,
    /// Code of the kind on the wire
    pub code: u8,
    /// Subcommand name
    pub command: &'static str,
    /// Alternative subcommand names
    pub aliases: &'static [&'static str],
    /// One line description
    pub about: &'static str,
    /// Payload fields, in argument order
    pub fields: &'static [FieldSpec],
}

/// Every transaction kind, ordered by wire code.
pub static REGISTRY: &[KindSpec] = &[
    KindSpec {
        kind: TransactionKind::CreateAccount,
        code: 0,
        command: "account",
        aliases: &[],
        about: "create a new account",
        fields: &[
            field("pub", FieldType::Text, "public key of the new account"),
            field("name", FieldType::Text, "username of the new account"),
        ],
    },
    KindSpec {
        kind: TransactionKind::ApproveNode,
        code: 1,
        command: "vote-leader",
        aliases: &[],
        about: "vote for a leader",
        fields: &[field("target", FieldType::Text, "the leader")],
    },
    KindSpec {
        kind: TransactionKind::DisapproveNode,
        code: 2,
        command: "unvote-leader",
        aliases: &[],
        about: "remove a leader vote",
        fields: &[field("target", FieldType::Text, "the leader")],
    },
    KindSpec {
        kind: TransactionKind::Transfer,
        code: 3,
        command: "transfer",
        aliases: &["xfer"],
        about: "transfer coins",
        fields: &[
            field("receiver", FieldType::Text, "receiving account"),
            field("amount", FieldType::Integer, "amount to transfer"),
        ],
    },
    KindSpec {
        kind: TransactionKind::Comment,
        code: 4,
        command: "comment",
        aliases: &[],
        about: "publish a new JSON content",
        fields: &[
            field("link", FieldType::Text, "an arbitrary string identifying your content"),
            field("pa", FieldType::Text, "parent author (if you are replying to another comment)"),
            field("pp", FieldType::Text, "parent link (if you are replying to another comment)"),
            field("json", FieldType::Json, "a json object"),
            field("vt", FieldType::Integer, "the amount of VT to spend on the forced vote"),
            field("tag", FieldType::Text, "the tag of the forced vote"),
        ],
    },
    KindSpec {
        kind: TransactionKind::Profile,
        code: 6,
        command: "profile",
        aliases: &["userJson"],
        about: "modify an account profile",
        fields: &[field("json", FieldType::Json, "the profile json object")],
    },
    KindSpec {
        kind: TransactionKind::Follow,
        code: 7,
        command: "follow",
        aliases: &["subscribe"],
        about: "start following another user",
        fields: &[field("target", FieldType::Text, "user to follow")],
    },
    KindSpec {
        kind: TransactionKind::Unfollow,
        code: 8,
        command: "unfollow",
        aliases: &["unsubscribe"],
        about: "stop following another user",
        fields: &[field("target", FieldType::Text, "user to unfollow")],
    },
    KindSpec {
        kind: TransactionKind::NewKey,
        code: 10,
        command: "new-key",
        aliases: &[],
        about: "add new key with custom perms",
        fields: &[
            field("id", FieldType::Text, "identifier of the key"),
            field("pub", FieldType::Text, "public key"),
            field("types", FieldType::IntegerList, "allowed transaction types, e.g. [3,4]"),
        ],
    },
    KindSpec {
        kind: TransactionKind::RemoveKey,
        code: 11,
        command: "remove-key",
        aliases: &[],
        about: "remove a previously added key",
        fields: &[field("id", FieldType::Text, "identifier of the key")],
    },
    KindSpec {
        kind: TransactionKind::ChangePassword,
        code: 12,
        command: "change-password",
        aliases: &[],
        about: "change the master key of an account",
        fields: &[field(
            "pub",
            FieldType::Text,
            "the new public key that will have full control over your account",
        )],
    },
];

impl TransactionKind {
    /// Every kind, in wire code order.
    pub fn all() -> impl Iterator<Item = TransactionKind> {
        REGISTRY.iter().map(|spec| spec.kind)
    }

    /// Gets the registry entry of this kind.
    pub fn spec(&self) -> &'static KindSpec {
        REGISTRY
            .iter()
            .find(|spec| spec.kind == *self)
            .unwrap_or_else(|| unreachable!("every kind has a registry entry"))
    }

    /// Gets the wire code.
    pub fn code(&self) -> u8 {
        self.spec().code
    }

    /// Gets the payload fields.
    pub fn fields(&self) -> &'static [FieldSpec] {
        self.spec().fields
    }

    /// Looks up a kind by wire code.
    pub fn from_code(code: u64) -> Result<Self, CoreError> {
        REGISTRY
            .iter()
            .find(|spec| u64::from(spec.code) == code)
            .map(|spec| spec.kind)
            .ok_or_else(|| CoreError::MalformedArgument(format!("unknown transaction type {}", code)))
    }

    /// Looks up a kind by command name or alias.
    pub fn from_command(name: &str) -> Option<Self> {
        REGISTRY
            .iter()
            .find(|spec| spec.command == name || spec.aliases.contains(&name))
            .map(|spec| spec.kind)
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spec().command)
    }
}

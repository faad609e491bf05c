//! Kind specific transaction payloads.

use crate::errors::CoreError;
use crate::kinds::TransactionKind;
use serde::Deserialize;
use serde_json::{Map, Value};

/// The data object of a transaction.
///
/// A payload always holds exactly the fields its kind requires, each with a
/// value of the registered type.
#[derive(Clone, Debug, PartialEq)]
pub struct Payload {
    kind: TransactionKind,
    data: Map<String, Value>,
}

/// A transaction as given to the sign command.
#[derive(Debug, Deserialize)]
struct RawTransaction {
    #[serde(rename = "type")]
    code: u64,
    #[serde(default)]
    data: Map<String, Value>,
}

impl Payload {
    /// Builds a payload from positional arguments, in registry field order.
    pub fn from_args<S: AsRef<str>>(kind: TransactionKind, args: &[S]) -> Result<Self, CoreError> {
        let fields = kind.fields();
        if args.len() != fields.len() {
            return Err(CoreError::MalformedArgument(format!(
                "{} takes {} arguments, got {}",
                kind,
                fields.len(),
                args.len()
            )));
        }

        let mut data = Map::new();
        for (field, arg) in fields.iter().zip(args) {
            data.insert(field.name.to_string(), field.ty.parse_arg(field.name, arg.as_ref())?);
        }
        Ok(Self { kind, data })
    }

    /// Builds a payload from named values supplied in any order.
    pub fn from_fields<I, K>(kind: TransactionKind, values: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let mut given: Map<String, Value> = values.into_iter().map(|(k, v)| (k.into(), v)).collect();

        let mut data = Map::new();
        for field in kind.fields() {
            let value = given.remove(field.name).ok_or_else(|| {
                CoreError::MalformedArgument(format!("{} requires field {}", kind, field.name))
            })?;
            data.insert(field.name.to_string(), field.ty.check(field.name, value)?);
        }

        if let Some(extra) = given.keys().next() {
            return Err(CoreError::MalformedArgument(format!(
                "{} has no field {}",
                kind, extra
            )));
        }
        Ok(Self { kind, data })
    }

    /// Parses and validates a raw `{"type": code, "data": {...}}` transaction.
    ///
    /// Other top level keys are ignored; sender and timestamp are always set
    /// by the builder.
    pub fn from_raw_transaction(raw: &str) -> Result<Self, CoreError> {
        let raw: RawTransaction = serde_json::from_str(raw)
            .map_err(|e| CoreError::MalformedArgument(format!("invalid transaction: {}", e)))?;
        let kind = TransactionKind::from_code(raw.code)?;
        Self::from_fields(kind, raw.data)
    }

    /// Creates an account named `name` controlled by `public_key`.
    pub fn create_account(public_key: &str, name: &str) -> Self {
        Self::typed(TransactionKind::CreateAccount, vec![public_key.into(), name.into()])
    }

    /// Votes for `leader`.
    pub fn approve_node(leader: &str) -> Self {
        Self::typed(TransactionKind::ApproveNode, vec![leader.into()])
    }

    /// Removes a vote for `leader`.
    pub fn disapprove_node(leader: &str) -> Self {
        Self::typed(TransactionKind::DisapproveNode, vec![leader.into()])
    }

    /// Transfers `amount` to `receiver`.
    pub fn transfer(receiver: &str, amount: i64) -> Self {
        Self::typed(TransactionKind::Transfer, vec![receiver.into(), amount.into()])
    }

    /// Publishes content, optionally as a reply, with a forced vote.
    pub fn comment(
        link: &str,
        parent_author: &str,
        parent_link: &str,
        json: Value,
        vote_amount: i64,
        vote_tag: &str,
    ) -> Self {
        Self::typed(
            TransactionKind::Comment,
            vec![
                link.into(),
                parent_author.into(),
                parent_link.into(),
                json,
                vote_amount.into(),
                vote_tag.into(),
            ],
        )
    }

    /// Replaces the profile json of the sender.
    pub fn profile(json: Value) -> Self {
        Self::typed(TransactionKind::Profile, vec![json])
    }

    /// Follows `target`.
    pub fn follow(target: &str) -> Self {
        Self::typed(TransactionKind::Follow, vec![target.into()])
    }

    /// Unfollows `target`.
    pub fn unfollow(target: &str) -> Self {
        Self::typed(TransactionKind::Unfollow, vec![target.into()])
    }

    /// Adds a key allowed to sign the given transaction types.
    pub fn new_key(key_id: &str, public_key: &str, allowed_types: &[i64]) -> Self {
        Self::typed(
            TransactionKind::NewKey,
            vec![key_id.into(), public_key.into(), allowed_types.to_vec().into()],
        )
    }

    /// Removes a previously added key.
    pub fn remove_key(key_id: &str) -> Self {
        Self::typed(TransactionKind::RemoveKey, vec![key_id.into()])
    }

    /// Replaces the master key of the sender.
    pub fn change_password(new_public_key: &str) -> Self {
        Self::typed(TransactionKind::ChangePassword, vec![new_public_key.into()])
    }

    // Values are given in registry order and are already of the right type.
    fn typed(kind: TransactionKind, values: Vec<Value>) -> Self {
        let data = kind
            .fields()
            .iter()
            .map(|f| f.name.to_string())
            .zip(values)
            .collect();
        Self { kind, data }
    }

    /// Gets the kind.
    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    /// Gets the data object.
    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Gets one field value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }

    /// Splits the payload into its kind and data object.
    pub fn into_parts(self) -> (TransactionKind, Map<String, Value>) {
        (self.kind, self.data)
    }
}

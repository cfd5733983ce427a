use alloy_dyn_abi::TypedData;
use alloy_sol_types::Eip712Domain;

use crate::mail::Mail;

/// Build the full typed-data object (`types`, `primaryType`, `domain`,
/// `message`) for a mail under the given domain.
pub fn mail_typed_data(mail: &Mail, domain: &Eip712Domain) -> TypedData {
    TypedData::from_struct(mail, Some(domain.clone()))
}

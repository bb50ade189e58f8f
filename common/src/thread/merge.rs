use super::ParsedMessage;

/// Interleave both sides into one conversation, oldest first.
///
/// The sort is stable over `buyer ++ dealer`, so equal keys keep input order
/// with buyer messages ahead of dealer ones.
pub fn merge_chronological(
    buyer: Vec<ParsedMessage>,
    dealer: Vec<ParsedMessage>,
) -> Vec<ParsedMessage> {
    let mut merged = buyer;
    merged.extend(dealer);
    merged.sort_by_key(|m| m.sort_key);
    merged
}

// SPDX-License-Identifier: MIT OR Apache-2.0
//! Iteration over the immediate members of an object or array

use crate::value::Value;
use bealach_core::{Member, MemberCursor, classify_and_skip};

/// Iterator over the members of a container value
///
/// Object members come with their key (a `String` value); array members
/// come with `None`. Iteration stops at the first structure it cannot
/// follow.
#[derive(Debug, Clone)]
pub struct Children<'v> {
    doc: &'v [u8],
    cursor: Option<MemberCursor<'v>>,
}

impl<'v> Children<'v> {
    pub(crate) fn new(doc: &'v [u8], container: bool) -> Self {
        let cursor = if container {
            MemberCursor::open(doc, 0)
        } else {
            None
        };
        Self { doc, cursor }
    }
}

impl<'v> Iterator for Children<'v> {
    type Item = (Option<Value<'v>>, Value<'v>);

    fn next(&mut self) -> Option<Self::Item> {
        let cursor = self.cursor.as_mut()?;
        if let Member::Entry { key, value } = cursor.next_member()
            && let Some(token) = classify_and_skip(self.doc, value)
            && token.closed
        {
            cursor.resume_at(token.end);
            let key = key.map(|k| Value::from_token(self.doc, k));
            return Some((key, Value::from_token(self.doc, token)));
        }
        self.cursor = None;
        None
    }
}

//! Per-file three-way merge decision
//!
//! Each path is judged by the blob IDs it has at the split point, on the
//! current branch (head) and on the branch being merged (other). `None` means
//! the path is absent on that side. First matching rule wins:
//!
//! | condition        | resolution                         |
//! |------------------|------------------------------------|
//! | head == other    | keep head                          |
//! | other == split   | keep head                          |
//! | head == split    | take other (or remove if it is gone) |
//! | otherwise        | conflict                           |

use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Leave the head version (or its absence) untouched
    Keep,
    /// Write and stage the other branch's blob
    Take(ObjectId),
    /// Delete the file and stage its removal
    Remove,
    /// Both sides changed the file differently
    Conflict,
}

impl Resolution {
    pub fn resolve(
        split: Option<&ObjectId>,
        head: Option<&ObjectId>,
        other: Option<&ObjectId>,
    ) -> Self {
        if head == other || other == split {
            Resolution::Keep
        } else if head == split {
            match other {
                Some(oid) => Resolution::Take(oid.clone()),
                None => Resolution::Remove,
            }
        } else {
            Resolution::Conflict
        }
    }
}

const CONFLICT_HEAD_MARKER: &[u8] = b"<<<<<<< HEAD\n";
const CONFLICT_SEPARATOR: &[u8] = b"=======\n";
const CONFLICT_END_MARKER: &[u8] = b">>>>>>>\n";

/// Content written for a conflicted path
///
/// Each present side is terminated with a newline if it lacks one; an absent
/// side contributes nothing between its markers.
pub fn conflict_content(head: Option<&[u8]>, other: Option<&[u8]>) -> Bytes {
    fn push_section(buffer: &mut Vec<u8>, side: Option<&[u8]>) {
        if let Some(content) = side.filter(|content| !content.is_empty()) {
            buffer.extend_from_slice(content);
            if !content.ends_with(b"\n") {
                buffer.push(b'\n');
            }
        }
    }

    let mut buffer = Vec::new();
    buffer.extend_from_slice(CONFLICT_HEAD_MARKER);
    push_section(&mut buffer, head);
    buffer.extend_from_slice(CONFLICT_SEPARATOR);
    push_section(&mut buffer, other);
    buffer.extend_from_slice(CONFLICT_END_MARKER);

    Bytes::from(buffer)
}

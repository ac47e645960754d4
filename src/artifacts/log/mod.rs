//! Commit history traversal
//!
//! History is a pair of singly linked chains through the commit store:
//! `prev_commit` links the commits of one branch, `global_prev_commit` links
//! every commit in the order it was made. `rev_list` walks either chain
//! lazily from a starting commit down to the root.

pub mod rev_list;

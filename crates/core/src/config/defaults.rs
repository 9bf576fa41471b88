//! Default values for configuration fields

pub(super) fn default_tail_mailbox_capacity() -> usize {
    1024
}

pub(super) fn default_strip_bom() -> bool {
    true
}

pub(super) fn default_poll_interval_ms() -> u64 {
    500
}

pub(super) fn default_validation_mailbox_capacity() -> usize {
    64
}

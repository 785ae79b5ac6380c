//! Stale-response guards for asynchronous load operations.
//!
//! Load operations (file import, catalog import) are not cancellable: a
//! superseding load does not abort an in-flight one, it merely makes its
//! eventual completion stale. Each class of load keeps a monotonically
//! increasing counter; `begin` hands out a ticket stamped with the new
//! counter value and `finish` discards any completion whose ticket no
//! longer matches.

/// The two classes of load that race independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadClass {
    File,
    Catalog,
}

/// Proof of a started load operation. Carried through the async boundary
/// and handed back to the matching `finish_*` call.
#[derive(Debug, Clone, Copy)]
pub struct LoadTicket {
    pub(crate) class: LoadClass,
    pub(crate) seq: u64,
}

/// What became of a finished load.
#[derive(Debug, PartialEq, Eq)]
pub enum ImportOutcome {
    /// The template was validated and swapped into the widget.
    Applied,
    /// A newer load of the same class superseded this one; nothing changed.
    Stale,
}

#[derive(Debug, Default)]
pub(crate) struct LoadGuard {
    file_seq: u64,
    catalog_seq: u64,
}

impl LoadGuard {
    pub(crate) fn begin(&mut self, class: LoadClass) -> LoadTicket {
        let seq = match class {
            LoadClass::File => {
                self.file_seq += 1;
                self.file_seq
            }
            LoadClass::Catalog => {
                self.catalog_seq += 1;
                self.catalog_seq
            }
        };
        LoadTicket { class, seq }
    }

    pub(crate) fn is_current(&self, ticket: LoadTicket) -> bool {
        let current = match ticket.class {
            LoadClass::File => self.file_seq,
            LoadClass::Catalog => self.catalog_seq,
        };
        ticket.seq == current
    }
}

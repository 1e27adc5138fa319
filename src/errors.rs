// Copyright © Senka
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

/// Errors surfaced by the decode pipeline.
///
/// Only two variants abort a whole transaction decode: a transaction whose
/// log/message structure cannot be read at all, and an action string the
/// alias table does not know. The latter is fatal by design so that
/// unmodeled on-chain behavior surfaces instead of silently dropping value.
/// A missing *sub*-event inside an otherwise recognized message is not an
/// error: the extractor leaves the corresponding fact fields unset and the
/// journal mapper emits nothing for them.
#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("malformed transaction: {reason}")]
    MalformedTransaction { reason: String },

    #[error("unrecognized action `{action}`")]
    UnrecognizedAction { action: String },

    #[error("attribute `{key}` not found in event")]
    MissingAttribute { key: String },

    #[error("cannot lex amount token `{raw}`: no leading digit run")]
    InvalidAmount { raw: String },
}

//! regionmap-cli
//! =============
//!
//! Command-line interface for `regionmap-core`.
//!
//! This crate primarily provides a binary (`regionmap`). The library target
//! only exists so that the overview below renders as documentation.
//!
//! Quick start
//! -----------
//!
//! ```text
//! regionmap --help
//! regionmap layers
//! regionmap inspect "Batas Kecamatan.geojson"
//! regionmap labels "KEL SIPOHOLON.geojson"
//! regionmap click "Batas Kecamatan.geojson" Tarutung
//! regionmap drill "Siborong Borong"
//! ```
//!
//! Every command loads datasets through the same boundary layer a map view
//! uses, drawing onto a text surface that records what a renderer would do.
//!
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # seqcompare - Grouped Sequence Comparison
//!
//! Summarizes aligned amino-acid sequences organized in named groups and
//! renders four views of them: the most frequent residue per group, the
//! residue frequencies per group, every member at the positions with
//! diversity, and every member in full.
//!
//! ## Architecture
//!
//! - `model`: residues, positions, groups, the dataset and its preconditions,
//!   viewer state
//! - `frequency`: reading and building per-position frequency tables
//! - `consensus`: finding the group member matching the consensus
//! - `diff`: marking residues identical to the master sequence
//! - `ruler`: dense and sparse coordinate rulers
//! - `views`: the four view builders
//! - `formats`: JSON dataset and FASTA group loaders
//! - `config`: rendering options stored as TOML
//! - `text`: fixed-width text output
//! - `ui`, `event`, `controller`: the terminal viewer

pub mod config;
pub mod consensus;
pub mod controller;
pub mod diff;
pub mod event;
pub mod formats;
pub mod frequency;
pub mod glyphs;
pub mod model;
pub mod ruler;
pub mod text;
pub mod ui;
pub mod views;

//! Document module: conversion between [`crate::Config`] and the on-disk XML
//! document.

pub mod codec;

pub use codec::{decode_document, encode_document, DecodeReport, DocumentError};

// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model for the annotation session and the backend protocol.

pub mod annotation;
pub mod protocol;

// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod access;
pub mod aggregate;
pub mod cli;
pub mod commands;
pub mod commission;
pub mod config;
pub mod daily;
pub mod error;
pub mod filters;
pub mod highlights;
pub mod models;
pub mod normalize;
pub mod recovery;
pub mod sheets;
pub mod utils;

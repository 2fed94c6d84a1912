// SPDX-License-Identifier: Apache-2.0

mod capture;
mod decode;
mod frames;

// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! The fixed workload every backend transforms.
//!
//! A single static JavaScript module is shared by all candidates so that
//! timing differences come from the backends alone, never from the input.

/// Source handed to every backend, byte for byte.
const SOURCE: &str = r#"
'use strict';

class Foo {
  foo() {}
}

class Bar extends Foo {
  foo() {
    super.foo();
  }
  async bar() {}
}

class Baz extends Bar {
  foo() {
    super.foo();
    this.baz()
  }
  baz() {

  }
  async other() {
    this.baz()
    await super.bar()
  }
}

/**
 * Extract red color out of a color integer:
 *
 * 0x00DEAD -> 0x00
 *
 * @param  {Number} color
 * @return {Number}
 */
function red( color )
{
    let foo = 3.14;
    return color >> 16;
}

/**
 * Extract green out of a color integer:
 *
 * 0x00DEAD -> 0xDE
 *
 * @param  {Number} color
 * @return {Number}
 */
function green( color )
{
    return ( color >> 8 ) & 0xFF;
}

/**
 * Extract blue color out of a color integer:
 *
 * 0x00DEAD -> 0xAD
 *
 * @param  {Number} color
 * @return {Number}
 */
function blue( color )
{
    return color & 0xFF;
}

/**
 * Converts an integer containing a color such as 0x00DEAD to a hex
 * string, such as '#00DEAD';
 *
 * @param  {Number} int
 * @return {String}
 */
function intToHex( int )
{
    const mask = '#000000';

    const hex = int.toString( 16 );

    return mask.substring( 0, 7 - hex.length ) + hex;
}

/**
 * Converts a hex string containing a color such as '#00DEAD' to
 * an integer, such as 0x00DEAD;
 *
 * @param  {Number} num
 * @return {String}
 */
function hexToInt( hex )
{
    return parseInt( hex.substring( 1 ), 16 );
}

module.exports = {
    red,
    green,
    blue,
    intToHex,
    hexToInt,
};
"#;

static FIXED: Workload = Workload {
    name: "color-utils",
    filename: "input.js",
    source: SOURCE,
};

/// Immutable benchmark input.
#[derive(Debug, PartialEq, Eq)]
pub struct Workload {
    name: &'static str,
    filename: &'static str,
    source: &'static str,
}

impl Workload {
    /// The process-wide workload. Every call returns the same instance.
    pub fn fixed() -> &'static Workload {
        &FIXED
    }

    /// Short display name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// File name reported to backends that read the source from stdin.
    pub fn filename(&self) -> &'static str {
        self.filename
    }

    pub fn as_str(&self) -> &'static str {
        self.source
    }

    pub fn as_bytes(&self) -> &'static [u8] {
        self.source.as_bytes()
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// CRC32 of the source, for confirming identical input across runs.
    pub fn checksum(&self) -> u32 {
        crc32fast::hash(self.as_bytes())
    }
}

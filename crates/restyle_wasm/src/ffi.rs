//! C-ABI exports for WebAssembly hosts.
//!
//! # Protocol
//!
//! 1. Host calls `restyle_protocol_version` and checks it is 1
//! 2. Host allocates buffers via `restyle_alloc`
//! 3. Host writes the UTF-16 source and the rule table asset into them
//! 4. Host optionally calls `restyle_rules_status` to validate the table
//! 5. Host calls `restyle_tokenize`; `restyle_on_declaration` fires once
//!    per declaration, synchronously, in source order
//! 6. Host frees the buffers via `restyle_dealloc`
//!
//! # Memory Management
//!
//! - Buffers are owned by the host; the scanner only borrows them for the
//!   duration of one call and never retains a pointer.
//! - `restyle_alloc` aligns to 8, so a returned pointer is valid for `u16`.
//! - Null pointers, non-positive lengths, and misaligned source pointers are
//!   treated as empty input.

use std::alloc::{alloc, dealloc, Layout};

const ALIGN: usize = 8;

#[cfg(target_arch = "wasm32")]
#[link(wasm_import_module = "env")]
extern "C" {
    /// Implemented by the host. Must not re-enter `restyle_tokenize` for the
    /// same buffer.
    fn restyle_on_declaration(
        start: i32,
        end: i32,
        rule_id: i32,
        semicolon_end: i32,
        is_important: i32,
    );
}

// === Memory Management ===

/// Allocate `size` bytes for the host, aligned to 8. Returns null on failure
/// or when `size` is not positive.
#[allow(unsafe_code, reason = "exported symbol and raw allocation for the host")]
#[unsafe(no_mangle)]
pub extern "C" fn restyle_alloc(size: i32) -> *mut u8 {
    let Ok(size) = usize::try_from(size) else {
        return std::ptr::null_mut();
    };
    if size == 0 {
        return std::ptr::null_mut();
    }
    let Ok(layout) = Layout::from_size_align(size, ALIGN) else {
        return std::ptr::null_mut();
    };
    // SAFETY: `layout` has non-zero size.
    unsafe { alloc(layout) }
}

/// Free a buffer returned by [`restyle_alloc`].
///
/// # Safety
///
/// `ptr` must come from `restyle_alloc(size)` with the same `size` and must
/// not be used afterwards.
#[allow(unsafe_code, reason = "exported symbol and raw deallocation for the host")]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn restyle_dealloc(ptr: *mut u8, size: i32) {
    let Ok(size) = usize::try_from(size) else {
        return;
    };
    if ptr.is_null() || size == 0 {
        return;
    }
    let Ok(layout) = Layout::from_size_align(size, ALIGN) else {
        return;
    };
    // SAFETY: caller guarantees `ptr` was allocated with this layout.
    unsafe { dealloc(ptr, layout) }
}

// === Queries ===

#[allow(unsafe_code, reason = "exported symbol")]
#[unsafe(no_mangle)]
pub extern "C" fn restyle_protocol_version() -> i32 {
    crate::PROTOCOL_VERSION
}

/// Validate a rule table: 0 when usable, otherwise its error code.
///
/// # Safety
///
/// `rules_ptr` must be null or point to `rules_len` readable bytes.
#[allow(unsafe_code, reason = "exported symbol reading a host buffer")]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn restyle_rules_status(rules_ptr: *const u8, rules_len: i32) -> i32 {
    // SAFETY: forwarded from the caller's contract.
    let rules = unsafe { host_slice(rules_ptr, rules_len) };
    crate::rules_status(rules)
}

// === Scanning ===

/// Scan a UTF-16 buffer, calling the host's `restyle_on_declaration` for
/// each declaration.
///
/// # Safety
///
/// `source_ptr` must be null or point to `source_len` readable `u16`s;
/// `rules_ptr` must be null or point to `rules_len` readable bytes. Neither
/// buffer may be mutated during the call.
#[cfg(target_arch = "wasm32")]
#[allow(unsafe_code, reason = "exported symbol reading host buffers and calling the host")]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn restyle_tokenize(
    source_ptr: *const u16,
    source_len: i32,
    rules_ptr: *const u8,
    rules_len: i32,
) {
    // SAFETY: forwarded from the caller's contract.
    let source = unsafe { host_slice(source_ptr, source_len) };
    // SAFETY: forwarded from the caller's contract.
    let rules = unsafe { host_slice(rules_ptr, rules_len) };
    crate::scan(source, rules, |d| {
        // SAFETY: the host provides this import; arguments are plain integers.
        unsafe {
            restyle_on_declaration(d.start, d.end, d.rule_id, d.semicolon_end, d.is_important);
        }
    });
}

/// Borrow a host buffer, treating null, misaligned, or non-positive lengths
/// as empty.
///
/// # Safety
///
/// A non-null, aligned `ptr` must point to `len` readable elements that stay
/// unmodified for `'a`.
#[allow(unsafe_code, reason = "slice construction over a host-provided buffer")]
unsafe fn host_slice<'a, T>(ptr: *const T, len: i32) -> &'a [T] {
    let Ok(len) = usize::try_from(len) else {
        return &[];
    };
    if len == 0 || ptr.is_null() || !ptr.is_aligned() {
        return &[];
    }
    // SAFETY: non-null and aligned, checked above; length from the caller.
    unsafe { std::slice::from_raw_parts(ptr, len) }
}

#[cfg(test)]
#[allow(
    unsafe_code,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "tests call the exported functions directly"
)]
mod tests;

/***************************************************************************************************
 * Copyright (c) 2021-2023 Qualcomm Innovation Center, Inc. All rights reserved.
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy of this software
 * and associated documentation files (the “Software”), to deal in the Software without
 * restriction, including without limitation the rights to use, copy, modify, merge, publish,
 * distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the
 * Software is furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all copies or
 * substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING
 * BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
 * NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
 * DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.
 **************************************************************************************************/
/***************************************************************************************************
 * rs_microcbor CBOR structural walker
 *
 * A compact streaming serializer and zero-copy deserializer for CBOR (RFC8949). This
 * implementation is designed for use in constrained systems and requires neither the Rust
 * standard library nor an allocator.
 **************************************************************************************************/
/// The structural walker is the iteration engine shared by item length measurement, map key
/// lookup, positional indexing and the pretty-printer. It consumes one complete CBOR item per
/// step, maintaining a count of units remaining in the current container and a LIFO of
/// suspended counts for the enclosing containers.
///
/// Maps are modelled as arrays of 2xN units so that keys and values share a single counter.
/// Chunked (indefinite length) byte and text strings are containers of chunks. The break
/// stop-code closes the innermost indefinite container regardless of its remaining unit count.
///
/// An explicit fixed-depth stack is used rather than recursion so that walking depth never
/// depends on the OS stack. The stack element is a single `u32` unit count.
use crate::constants::*;
use crate::header::Header;

#[cfg(feature = "trace")]
use func_trace::trace;

#[cfg(feature = "trace")]
func_trace::init_depth_var!();

/// Deepest container nesting the walker will track. Documents nested more deeply terminate the
/// walk early and report the truncated-input best estimate.
const NESTING_MAX: usize = 32;

/// Fixed-capacity LIFO of suspended unit counts, one entry per open container.
#[derive(Debug, Copy, Clone)]
struct UnitStack {
    slots: [u32; NESTING_MAX],
    depth: usize,
}

impl UnitStack {
    fn new() -> UnitStack {
        UnitStack {
            slots: [0; NESTING_MAX],
            depth: 0,
        }
    }

    #[inline]
    fn len(&self) -> usize {
        self.depth
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.depth == 0
    }

    /// Push a suspended unit count. Returns `false` when the nesting limit is reached.
    #[inline]
    fn push(&mut self, units: u32) -> bool {
        if self.depth < NESTING_MAX {
            self.slots[self.depth] = units;
            self.depth += 1;
            true
        } else {
            false
        }
    }

    #[inline]
    fn pop(&mut self) -> Option<u32> {
        if self.depth > 0 {
            self.depth -= 1;
            Some(self.slots[self.depth])
        } else {
            None
        }
    }
}

/// One consumed item, as reported by [`Walker::step`].
#[derive(Debug, Copy, Clone)]
pub(crate) struct StepItem {
    /// Offset of the first byte of the item (including any tag prefix).
    pub start: usize,
    /// Offset just past the item's prefix and, for definite byte/text strings, its payload.
    pub end: usize,
    /// The item's decoded header.
    pub head: Header,
    /// Container nesting depth of the item, before the item itself opens a container.
    pub depth: usize,
    /// After this item the walk is back at the top level of the walked container.
    pub top_level: bool,
    /// This item completed the walked container; `Walker::progress` is now its total length.
    pub closed_root: bool,
}

impl StepItem {
    /// `true` when this item is the break stop-code.
    #[inline]
    pub fn is_break(&self) -> bool {
        self.head.major == MajorType::Special && self.head.minor == AI_INDEFINITE
    }

    /// `true` when this item opens a container scope: any array or map, or an indefinite
    /// length byte or text string. Empty definite containers count; they open and close in
    /// the same step.
    #[inline]
    pub fn is_container(&self) -> bool {
        container_units(&self.head).is_some()
    }
}

/// The number of content units a container item holds, or `None` when the header does not
/// describe a container. Maps yield 2xN units; indefinite containers yield the in-band
/// [`UNITS_INDEFINITE`] sentinel.
pub(crate) fn container_units(head: &Header) -> Option<u32> {
    match head.major {
        MajorType::Map => {
            if head.minor == AI_INDEFINITE {
                Some(UNITS_INDEFINITE)
            } else {
                Some(head.value.saturating_mul(2))
            }
        }
        MajorType::Array => {
            if head.minor == AI_INDEFINITE {
                Some(UNITS_INDEFINITE)
            } else {
                Some(head.value)
            }
        }
        MajorType::Bytes | MajorType::Text if head.minor == AI_INDEFINITE => {
            Some(UNITS_INDEFINITE)
        }
        _ => None,
    }
}

/// Item-at-a-time scan over a CBOR byte slice.
///
/// The walker is primed with the unit count of the container being walked and the offset of its
/// first content byte. `units == 1, progress == 0` walks exactly one item ("skip one").
#[derive(Debug, Copy, Clone)]
pub(crate) struct Walker<'buf> {
    bytes: &'buf [u8],
    units: u32,
    stack: UnitStack,
    progress: usize,
    done: bool,
}

impl<'buf> Walker<'buf> {
    /// Prime a walker over `bytes` with `units` remaining in the current container and the next
    /// item starting at `progress`. A zero unit count is an already-complete walk.
    pub fn new(bytes: &'buf [u8], units: u32, progress: usize) -> Walker<'buf> {
        Walker {
            bytes,
            units,
            stack: UnitStack::new(),
            progress,
            done: units == 0,
        }
    }

    /// Offset of the next unconsumed byte. When the walk has completed this is the total length
    /// of the walked container; when the input ran out first it is the best estimate available.
    #[inline]
    pub fn progress(&self) -> usize {
        self.progress
    }

    /// Units remaining in the current container, including the item about to be consumed.
    #[inline]
    pub fn units(&self) -> u32 {
        self.units
    }

    /// Suspend the current unit count and descend into a container holding `units` units.
    fn enter(&mut self, units: u32) {
        if self.stack.push(self.units) {
            self.units = units;
        } else {
            // Nesting limit reached: give up on this walk and report the best estimate.
            self.done = true;
        }
    }

    /// Consume exactly one complete CBOR item, including its container bookkeeping. Returns
    /// `None` once the walk has completed or the input is exhausted mid-container.
    #[cfg_attr(feature = "trace", trace)]
    pub fn step(&mut self) -> Option<StepItem> {
        if self.done || self.progress >= self.bytes.len() {
            return None;
        }

        // Consume one unit of the current container, unless it is indefinite.
        if self.units != UNITS_INDEFINITE {
            self.units -= 1;
        }

        let start = self.progress;
        let head = Header::decode(&self.bytes[start..]);
        let depth = self.stack.len();

        if let Some(units) = container_units(&head) {
            // Empty definite containers open and close within this step; there is nothing to
            // walk so the suspended count is not worth a stack slot.
            if units > 0 {
                self.enter(units);
            }
        }

        // Step over the item prefix, and the payload of definite byte and text strings.
        self.progress = start + head.length;
        if (head.major == MajorType::Bytes || head.major == MajorType::Text)
            && head.minor != AI_INDEFINITE
        {
            self.progress += head.value as usize;
        }
        let end = self.progress;

        // Closing containers: a spent unit count or a break stop-code steps back up one level.
        // Chained in a loop since one item may close several containers at once.
        let mut closed_root = false;
        let mut is_break = head.major == MajorType::Special && head.minor == AI_INDEFINITE;
        while self.units == 0 || is_break {
            is_break = false;
            match self.stack.pop() {
                Some(units) => self.units = units,
                None => {
                    self.done = true;
                    closed_root = true;
                    break;
                }
            }
        }

        Some(StepItem {
            start,
            end,
            head,
            depth,
            top_level: !closed_root && self.stack.is_empty(),
            closed_root,
        })
    }
}

/// Total encoded length of the single CBOR item starting at offset 0 of `bytes`, including any
/// tag prefix, the item prefix, its payload and all nested items.
///
/// For a truncated container the best estimate (every byte consumed before the input ran out)
/// is returned. The result never exceeds the slice length.
#[cfg_attr(feature = "trace", trace)]
pub(crate) fn item_length(bytes: &[u8]) -> usize {
    let head = Header::decode(bytes);

    let length = match container_units(&head) {
        Some(units) => {
            let mut walker = Walker::new(bytes, units, head.length);
            loop {
                match walker.step() {
                    Some(item) if item.closed_root => break walker.progress(),
                    Some(_) => (),
                    None => break walker.progress(),
                }
            }
        }
        None => {
            if (head.major == MajorType::Bytes || head.major == MajorType::Text)
                && head.minor != AI_INDEFINITE
            {
                head.length + head.value as usize
            } else {
                head.length
            }
        }
    };
    length.min(bytes.len())
}

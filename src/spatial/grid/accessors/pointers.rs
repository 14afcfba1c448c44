use super::super::*;

impl Grid {
    // === Raw pointer for JS interop ===
    // Cells are `repr(transparent)` u32, readable as a Uint32Array of ABGR (0 = empty)
    pub fn cells_ptr(&self) -> *const u32 {
        self.cells.as_ptr() as *const u32
    }
}

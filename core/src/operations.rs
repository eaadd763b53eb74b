use rand::{Rng, RngCore};

use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_SPRITE_HEIGHT};
use crate::opcode::Opcode;
use crate::state::State;

/// The flag register
const VF: usize = 0xF;

/// Moves on to the next instruction
fn next(state: &mut State) {
    state.pc = state.pc.wrapping_add(0x2);
}

/// Moves past the next instruction when `condition` holds, otherwise onto it
fn skip_if(state: &mut State, condition: bool) {
    let step = if condition { 0x4 } else { 0x2 };
    state.pc = state.pc.wrapping_add(step);
}

/// clear
pub fn clr(_op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) {
    state.frame_buffer = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    next(state);
}

/// PC = STACK.pop()
/// The popped address is the call itself, so execution resumes just after it
pub fn rts(_op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) {
    state.pc = state.pop();
    next(state);
}

/// PC = addr
pub fn jump(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) {
    state.pc = op.addr();
}

/// STACK.push(PC); PC = addr
pub fn call(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) {
    state.push(state.pc);
    state.pc = op.addr();
}

/// if Vx == kk then pc += 2
pub fn ske(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) {
    let condition = state.v[op.x()] == op.kk();
    skip_if(state, condition);
}

/// if Vx != kk then pc += 2
pub fn skne(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) {
    let condition = state.v[op.x()] != op.kk();
    skip_if(state, condition);
}

/// if Vx == Vy then pc += 2
pub fn skre(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) {
    let condition = state.v[op.x()] == state.v[op.y()];
    skip_if(state, condition);
}

/// Vx = kk
pub fn load(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) {
    state.v[op.x()] = op.kk();
    next(state);
}

/// Vx += kk
/// Overflow is dropped and VF is left alone
pub fn add(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) {
    state.v[op.x()] = state.v[op.x()].wrapping_add(op.kk());
    next(state);
}

/// Vx = Vy
pub fn mv(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) {
    state.v[op.x()] = state.v[op.y()];
    next(state);
}

/// Vx |= Vy
pub fn or(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) {
    state.v[op.x()] |= state.v[op.y()];
    next(state);
}

/// Vx &= Vy
pub fn and(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) {
    state.v[op.x()] &= state.v[op.y()];
    next(state);
}

/// Vx ^= Vy
pub fn xor(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) {
    state.v[op.x()] ^= state.v[op.y()];
    next(state);
}

/// Vx += Vy; VF = carry
pub fn addr(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) {
    let (res, carry) = state.v[op.x()].overflowing_add(state.v[op.y()]);
    state.v[op.x()] = res;
    state.v[VF] = u8::from(carry);
    next(state);
}

/// Vx -= Vy; VF = Vx >= Vy
/// VF is "not borrow", so equal operands also set it
pub fn sub(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) {
    let (vx, vy) = (state.v[op.x()], state.v[op.y()]);
    state.v[op.x()] = vx.wrapping_sub(vy);
    state.v[VF] = u8::from(vx >= vy);
    next(state);
}

/// Vx >>= 1; VF = lsb(Vx)
pub fn shr(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) {
    let vx = state.v[op.x()];
    state.v[op.x()] = vx >> 1;
    state.v[VF] = vx & 0x1;
    next(state);
}

/// Vx = Vy - Vx; VF = Vy >= Vx
pub fn subn(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) {
    let (vx, vy) = (state.v[op.x()], state.v[op.y()]);
    state.v[op.x()] = vy.wrapping_sub(vx);
    state.v[VF] = u8::from(vy >= vx);
    next(state);
}

/// Vx <<= 1; VF = msb(Vx)
pub fn shl(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) {
    let vx = state.v[op.x()];
    state.v[op.x()] = vx << 1;
    state.v[VF] = vx >> 7;
    next(state);
}

/// if Vx != Vy then pc += 2
pub fn skrne(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) {
    let condition = state.v[op.x()] != state.v[op.y()];
    skip_if(state, condition);
}

/// I = addr
pub fn loadi(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) {
    state.i = op.addr();
    next(state);
}

/// PC = V0 + addr
pub fn jumpi(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) {
    state.pc = op.addr() + u16::from(state.v[0x0]);
}

/// Vx = rand_byte & kk
pub fn rand(op: &dyn Opcode, state: &mut State, rng: &mut dyn RngCore) {
    let rand_byte: u8 = rng.random();
    state.v[op.x()] = rand_byte & op.kk();
    next(state);
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory i..i+n at position x, y on the FrameBuffer with wrapping.
/// Sets VF if any pixel is erased over the whole draw
pub fn draw(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) {
    let start_x = usize::from(state.v[op.x()]);
    let start_y = usize::from(state.v[op.y()]);
    let mut collision = false;

    for row in 0..op.n() {
        let sprite_byte = state.read(state.i.wrapping_add(u16::from(row)));
        let y = (start_y + usize::from(row)) % DISPLAY_HEIGHT;
        for bit in 0..8 {
            let x = (start_x + bit) % DISPLAY_WIDTH;
            let pixel_value = (sprite_byte >> (7 - bit)) & 0x1;
            let pixel = &mut state.frame_buffer[y][x];
            collision |= pixel_value & *pixel == 1;
            *pixel ^= pixel_value;
        }
    }

    state.v[VF] = u8::from(collision);
    next(state);
}

/// if keys[Vx].down then pc += 2
pub fn skpr(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) {
    let key = usize::from(state.v[op.x()] & 0xF);
    let condition = state.keys[key];
    skip_if(state, condition);
}

/// if keys[Vx].up then pc += 2
pub fn skup(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) {
    let key = usize::from(state.v[op.x()] & 0xF);
    let condition = !state.keys[key];
    skip_if(state, condition);
}

/// Vx = DT
pub fn moved(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) {
    state.v[op.x()] = state.delay_timer;
    next(state);
}

/// Vx = await key release
/// Without a released key the pc stays put, so the same instruction runs again next cycle
pub fn keyd(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) {
    if let Some(key) = state.last_released_key.take() {
        state.v[op.x()] = key;
        next(state);
    }
}

/// DT = Vx
pub fn loads(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) {
    state.delay_timer = state.v[op.x()];
    next(state);
}

/// ST = Vx
pub fn ld(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) {
    state.sound_timer = state.v[op.x()];
    next(state);
}

/// I += Vx
pub fn addi(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) {
    state.i = state.i.wrapping_add(u16::from(state.v[op.x()]));
    next(state);
}

/// I = (Vx & 0xF) * 5
/// Set I to the memory address of the glyph for the low nibble of Vx
/// See constants::SPRITE_SHEET for more details
pub fn ldspr(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) {
    state.i = u16::from((state.v[op.x()] & 0xF) * FONT_SPRITE_HEIGHT);
    next(state);
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i
pub fn bcd(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) {
    let value = state.v[op.x()];
    let digits = [value / 100, value / 10 % 10, value % 10];
    for (offset, digit) in (0u16..).zip(digits) {
        state.write(state.i.wrapping_add(offset), digit);
    }
    next(state);
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) {
    for (offset, register) in (0u16..).zip(0..=op.x()) {
        state.write(state.i.wrapping_add(offset), state.v[register]);
    }
    next(state);
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) {
    for (offset, register) in (0u16..).zip(0..=op.x()) {
        state.v[register] = state.read(state.i.wrapping_add(offset));
    }
    next(state);
}

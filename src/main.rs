fn main() {
    eyeball_arena::game::run();
}

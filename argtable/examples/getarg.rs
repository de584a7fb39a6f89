use argtable::ArgRegistry;

fn main() {
    let args = ArgRegistry::from_env();

    let name = args.get_arg("-name", "world");
    let count = args.get_arg("-count", 1);
    let shout = args.get_bool_arg("-shout", false);

    for _ in 0..count.max(0) {
        let line = format!("hello, {name}!");
        if shout {
            println!("{}", line.to_uppercase());
        } else {
            println!("{line}");
        }
    }

    for file in args.positionals() {
        println!("positional: {file}");
    }
}

use finite_automata::{NfaDesign, Pattern, State};

fn main() {
    println!("Finite automata - compiled design demo");
    println!("======================================");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let patterns: Vec<String> = if args.is_empty() {
        ["", "a", "ab", "a|b", "a*", "(ab|a)*", "a(b|c)*d", "[xyz]+", "ab?c"]
            .iter()
            .map(|pattern| pattern.to_string())
            .collect()
    } else {
        args
    };

    for text in &patterns {
        println!("\n=== Pattern: {:?} ===", text);

        let pattern = match Pattern::parse(text) {
            Ok(pattern) => pattern,
            Err(e) => {
                println!("Failed to parse pattern: {}", e);
                continue;
            }
        };

        println!("Rendered: {:#}", pattern);
        print_design(&pattern.to_nfa_design());
    }

    demonstrate_manual_construction();
}

fn print_design(design: &NfaDesign) {
    let mut accept: Vec<&State> = design.accept().iter().collect();
    accept.sort();

    println!("Start state: {}", design.start());
    println!(
        "Accepting states: {}",
        accept.iter().map(|state| state.to_string()).collect::<Vec<_>>().join(", ")
    );
    println!("Rules:");
    for rule in design.rulebook().rules() {
        println!("  {}", rule);
    }
}

fn demonstrate_manual_construction() {
    use finite_automata::state::labelled;
    use finite_automata::{DfaDesign, DfaRulebook, NfaRulebook, Rule};

    println!("\n=== Manual Construction Examples ===");

    // Strings whose third symbol from the end is 'b'.
    println!("\n--- Hand-written NFA ---");
    let nfa_design = NfaDesign::new(
        State::new(1),
        labelled([4]),
        NfaRulebook::new(vec![
            Rule::labelled(1, 'a', 1),
            Rule::labelled(1, 'b', 1),
            Rule::labelled(1, 'b', 2),
            Rule::labelled(2, 'a', 3),
            Rule::labelled(2, 'b', 3),
            Rule::labelled(3, 'a', 4),
            Rule::labelled(3, 'b', 4),
        ]),
    );
    print_design(&nfa_design);
    for input in ["bab", "bbbbb", "bbabb"] {
        println!("accepts({:?}) = {}", input, nfa_design.accepts(input));
    }

    println!("\n--- Equivalent DFA by subset construction ---");
    let dfa_design = nfa_design.to_dfa_design();
    println!("Rules: {}", dfa_design.rulebook().rules().len());
    for input in ["bab", "bbbbb", "bbabb", "bxb"] {
        match dfa_design.accepts(input) {
            Ok(accepted) => println!("accepts({:?}) = {}", input, accepted),
            Err(e) => println!("accepts({:?}) failed: {}", input, e),
        }
    }

    // Contains the substring "ab".
    println!("\n--- Hand-written DFA ---");
    let rulebook = DfaRulebook::new(vec![
        Rule::labelled(1, 'a', 2),
        Rule::labelled(1, 'b', 1),
        Rule::labelled(2, 'a', 2),
        Rule::labelled(2, 'b', 3),
        Rule::labelled(3, 'a', 3),
        Rule::labelled(3, 'b', 3),
    ]);
    match rulebook {
        Ok(rulebook) => {
            let design = DfaDesign::new(State::new(1), labelled([3]), rulebook);
            for input in ["a", "baa", "baba"] {
                match design.accepts(input) {
                    Ok(accepted) => println!("accepts({:?}) = {}", input, accepted),
                    Err(e) => println!("accepts({:?}) failed: {}", input, e),
                }
            }
        }
        Err(e) => println!("Failed to build rulebook: {}", e),
    }
}

//! Reader round-trip integration tests: source text in, a shaped heap
//! value out, exercising `idio-reader` and `idio-gc` together the way a
//! real embedder would (spec §4.7, §8 worked examples).

use idio::{read_from_string, Payload};

#[test]
fn reads_a_nested_list_of_mixed_numbers() {
    let (mut reader, mut handle) = read_from_string("<test>", "(1 2.5 -3 #xFF)");
    let v = reader.read(&mut handle).unwrap();
    let r = v.as_heap_ref().unwrap();

    let mut items = Vec::new();
    let mut cursor = v;
    loop {
        let Some(r) = cursor.as_heap_ref() else { break };
        match reader.heap.payload(r).unwrap().clone() {
            Payload::Pair(head, tail) => {
                items.push(head);
                cursor = tail;
            }
            _ => break,
        }
    }
    let _ = r;
    assert_eq!(items.len(), 4);
    assert_eq!(items[0].as_fixnum(), Some(1));
    assert_eq!(items[2].as_fixnum(), Some(-3));
    assert_eq!(items[3].as_fixnum(), Some(255));
}

#[test]
fn reads_the_pair_separator_worked_example() {
    let (mut reader, mut handle) = read_from_string("<test>", "(1 & 2)");
    let v = reader.read(&mut handle).unwrap();
    let r = v.as_heap_ref().unwrap();
    let Payload::Pair(head, tail) = reader.heap.payload(r).unwrap().clone() else {
        panic!("expected a pair")
    };
    assert_eq!(head.as_fixnum(), Some(1));
    assert_eq!(tail.as_fixnum(), Some(2));
}

#[test]
fn reads_a_string_and_a_symbol_side_by_side() {
    let (mut reader, mut handle) = read_from_string("<test>", r#"("hi" greeting)"#);
    let v = reader.read(&mut handle).unwrap();
    let r = v.as_heap_ref().unwrap();
    let Payload::Pair(head, tail) = reader.heap.payload(r).unwrap().clone() else {
        panic!("expected a pair")
    };
    let hr = head.as_heap_ref().unwrap();
    let Payload::String(s) = reader.heap.payload(hr).unwrap() else {
        panic!("expected a string")
    };
    assert_eq!(s.to_text_string().unwrap(), "hi");

    let tr = tail.as_heap_ref().unwrap();
    let Payload::Pair(sym, rest) = reader.heap.payload(tr).unwrap().clone() else {
        panic!("expected a pair")
    };
    assert!(rest.is_nil());
    let symr = sym.as_heap_ref().unwrap();
    assert!(matches!(reader.heap.payload(symr).unwrap(), Payload::Symbol(name) if &**name == "greeting"));
}

#[test]
fn source_location_is_recorded_for_a_composite() {
    let (mut reader, mut handle) = read_from_string("<test>", "(a b)");
    let v = reader.read(&mut handle).unwrap();
    let r = v.as_heap_ref().unwrap();
    let lexobj = reader.src_properties.get(r).expect("list should have a registered lexobj");
    assert_eq!(&*lexobj.filename, "<test>");
    assert_eq!(lexobj.line, 1);
}

#[test]
fn eof_on_blank_input_returns_the_eof_token() {
    let (mut reader, mut handle) = read_from_string("<test>", "");
    let v = reader.read(&mut handle).unwrap();
    assert_eq!(v.as_generic_constant(), None);
    assert_eq!(v.as_reader_token(), Some(idio::ReaderToken::Eof));
}

use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{FnArg, Ident, ImplItemFn, Pat, Type};

const INTEGER_TYPES: [&str; 12] = [
    "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128", "usize",
];

/// Parameter names that always receive the request instead of a path segment.
const REQUEST_NAMES: [&str; 2] = ["request", "_request"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Converter {
    Str,
    Int,
    Uuid,
}

impl Converter {
    pub fn for_type(ty: &Type) -> Self {
        match ty {
            Type::Group(group) => Self::for_type(&group.elem),
            Type::Paren(paren) => Self::for_type(&paren.elem),
            Type::Path(type_path) => match last_ident(type_path) {
                Some(ident) if INTEGER_TYPES.contains(&ident.as_str()) => Converter::Int,
                Some(ident) if ident == "Uuid" => Converter::Uuid,
                _ => Converter::Str,
            },
            _ => Converter::Str,
        }
    }

    pub fn tokens(self) -> TokenStream2 {
        match self {
            Converter::Str => quote! { ::htmx_view::ConverterTag::Str },
            Converter::Int => quote! { ::htmx_view::ConverterTag::Int },
            Converter::Uuid => quote! { ::htmx_view::ConverterTag::Uuid },
        }
    }
}

fn last_ident(type_path: &syn::TypePath) -> Option<String> {
    type_path
        .path
        .segments
        .last()
        .map(|segment| segment.ident.to_string())
}

pub struct PathParam {
    pub ident: Ident,
    pub name: String,
    pub ty: Type,
    pub converter: Converter,
}

pub enum Input {
    Request,
    Path(PathParam),
}

fn is_request(pat: &Pat, ty: &Type) -> bool {
    if let Pat::Ident(pat_ident) = pat {
        if REQUEST_NAMES.contains(&pat_ident.ident.to_string().as_str()) {
            return true;
        }
    }
    matches!(ty, Type::Path(type_path) if last_ident(type_path).as_deref() == Some("Request"))
}

/// Checks the receiver is `&self`.
pub fn check_receiver(method: &ImplItemFn) -> syn::Result<()> {
    match method.sig.inputs.first() {
        Some(FnArg::Receiver(receiver))
            if receiver.reference.is_some() && receiver.mutability.is_none() =>
        {
            Ok(())
        }
        _ => Err(syn::Error::new_spanned(
            &method.sig,
            "#[htmx_view] methods must take `&self`",
        )),
    }
}

/// Classify every non-receiver input of an action method, in declared order.
pub fn action_inputs(method: &ImplItemFn) -> syn::Result<Vec<Input>> {
    let mut inputs = Vec::new();
    let mut seen_request = false;
    for arg in method.sig.inputs.iter() {
        let FnArg::Typed(pat_type) = arg else {
            continue;
        };
        if is_request(&pat_type.pat, &pat_type.ty) {
            if seen_request {
                return Err(syn::Error::new_spanned(
                    pat_type,
                    "an action takes the request at most once",
                ));
            }
            seen_request = true;
            inputs.push(Input::Request);
            continue;
        }
        let Pat::Ident(pat_ident) = pat_type.pat.as_ref() else {
            return Err(syn::Error::new_spanned(
                &pat_type.pat,
                "path parameters must be plain identifiers",
            ));
        };
        let ident = pat_ident.ident.clone();
        let name = ident.to_string();
        inputs.push(Input::Path(PathParam {
            name: name.trim_start_matches("r#").to_string(),
            ident,
            ty: (*pat_type.ty).clone(),
            converter: Converter::for_type(&pat_type.ty),
        }));
    }
    Ok(inputs)
}

/// A verb method of the view itself takes `&self` plus exactly one argument, the request.
pub fn check_verb_handler(method: &ImplItemFn) -> syn::Result<()> {
    check_receiver(method)?;
    if method.sig.inputs.len() != 2 {
        return Err(syn::Error::new_spanned(
            &method.sig,
            format!(
                "`{}` is a verb handler and must take `(&self, request)`",
                method.sig.ident
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_converter_for_types() {
        assert_eq!(Converter::for_type(&parse_quote!(i64)), Converter::Int);
        assert_eq!(Converter::for_type(&parse_quote!(u32)), Converter::Int);
        assert_eq!(Converter::for_type(&parse_quote!(uuid::Uuid)), Converter::Uuid);
        assert_eq!(Converter::for_type(&parse_quote!(String)), Converter::Str);
        assert_eq!(Converter::for_type(&parse_quote!(f64)), Converter::Str);
        assert_eq!(Converter::for_type(&parse_quote!(Slug)), Converter::Str);
    }

    #[test]
    fn test_action_inputs_skip_request() {
        let method: ImplItemFn = parse_quote! {
            async fn hx_move(&self, request: Request, todo_id: i64, slug: String, owner: Uuid) -> Response {}
        };
        let inputs = action_inputs(&method).unwrap();
        assert!(matches!(inputs[0], Input::Request));
        let converters: Vec<(String, Converter)> = inputs
            .iter()
            .filter_map(|input| match input {
                Input::Path(param) => Some((param.name.clone(), param.converter)),
                Input::Request => None,
            })
            .collect();
        assert_eq!(
            converters,
            vec![
                ("todo_id".to_string(), Converter::Int),
                ("slug".to_string(), Converter::Str),
                ("owner".to_string(), Converter::Uuid),
            ]
        );
    }

    #[test]
    fn test_underscore_request_is_recognised() {
        let method: ImplItemFn = parse_quote! {
            async fn hx_delete(&self, _request: Req, todo_id: i64) -> Response {}
        };
        let inputs = action_inputs(&method).unwrap();
        assert!(matches!(inputs[0], Input::Request));
        assert_eq!(inputs.len(), 2);
    }

    #[test]
    fn test_receiver_must_be_shared_ref() {
        let owned: ImplItemFn = parse_quote! { fn hx_a(self) {} };
        let mutable: ImplItemFn = parse_quote! { fn hx_b(&mut self) {} };
        let shared: ImplItemFn = parse_quote! { fn hx_c(&self) {} };
        assert!(check_receiver(&owned).is_err());
        assert!(check_receiver(&mutable).is_err());
        assert!(check_receiver(&shared).is_ok());
    }

    #[test]
    fn test_verb_handler_takes_only_the_request() {
        let ok: ImplItemFn = parse_quote! { async fn get(&self, request: Request) -> Response {} };
        let missing: ImplItemFn = parse_quote! { async fn get(&self) -> Response {} };
        let extra: ImplItemFn = parse_quote! { async fn get(&self, request: Request, id: i64) -> Response {} };
        let owned: ImplItemFn = parse_quote! { async fn get(self, request: Request) -> Response {} };
        assert!(check_verb_handler(&ok).is_ok());
        assert!(check_verb_handler(&missing).is_err());
        assert!(check_verb_handler(&extra).is_err());
        assert!(check_verb_handler(&owned).is_err());
    }
}
